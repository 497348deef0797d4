use cucumber::World;
use std::collections::HashSet;
use std::process::ExitStatus;
use wiremock::MockServer;

#[derive(Default, World)]
pub struct FollowupWorld {
    pub server: Option<MockServer>,
    pub unset_vars: HashSet<String>,
    pub captured_output: Vec<u8>,
    pub command_status: Option<ExitStatus>,
}

impl std::fmt::Debug for FollowupWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowupWorld")
            .field("server", &self.server.as_ref().map(MockServer::uri))
            .field("unset_vars", &self.unset_vars)
            .field("captured_output", &String::from_utf8_lossy(&self.captured_output))
            .field("command_status", &self.command_status)
            .finish()
    }
}

impl FollowupWorld {
    /// Returns the mock server shared by the GitHub and generation endpoints,
    /// starting it on first use.
    pub async fn server(&mut self) -> &MockServer {
        if self.server.is_none() {
            self.server = Some(MockServer::start().await);
        }
        self.server.as_ref().expect("server was just started")
    }
}

#[tokio::main]
async fn main() {
    FollowupWorld::cucumber().run_and_exit("features").await;
}

mod steps;
