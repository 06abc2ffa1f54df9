use qn_core::ServerId;

use crate::Agent;

/// One unit of service capacity, owned by exactly one station.
///
/// The server is busy exactly when it holds an agent.
#[derive(Clone, Debug)]
pub struct Server {
    pub id:  ServerId,
    current: Option<Agent>,
}

impl Server {
    pub fn new(id: ServerId) -> Self {
        Self { id, current: None }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// The agent in service, if any.
    pub fn agent(&self) -> Option<&Agent> {
        self.current.as_ref()
    }

    /// Take `agent` into service.  Returns the agent back if already busy.
    pub fn assign(&mut self, mut agent: Agent) -> Result<(), Agent> {
        if self.is_busy() {
            return Err(agent);
        }
        agent.server = Some(self.id);
        self.current = Some(agent);
        Ok(())
    }

    /// Finish service: mark idle and hand the agent back.
    pub fn release(&mut self) -> Option<Agent> {
        self.current.take()
    }
}
