//! Client-driven streaming protocol.
//!
//! Every stream connection runs [`run_stream`], a loop over a three-state
//! machine ([`StreamState`]). Each iteration awaits one inbound frame,
//! applies it, and then, if the connection is active, drains the hand-off
//! slots and sends what it found. A paused or unsubscribed connection keeps
//! reading commands but never drains.
//!
//! The transport sits behind [`CommandStream`], so the loop runs the same
//! over a WebSocket or a scripted test stream.

use std::future::Future;

use tracing::{debug, trace};
use utte_core::UpdateDistribution;
use utte_types::{ClientCommand, CommandType, UniverseState};

use crate::error::StreamError;

/// Per-connection subscription state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamState {
    /// Initial state; nothing is sent.
    #[default]
    Unsubscribed,
    /// Subscribed and receiving snapshots.
    Active,
    /// Subscribed but paused.
    Paused,
}

impl StreamState {
    /// The state after `command`.
    ///
    /// PAUSE and RESUME have no effect on an unsubscribed connection.
    pub const fn apply(self, command: CommandType) -> Self {
        match (self, command) {
            (_, CommandType::Subscribe) => Self::Active,
            (_, CommandType::Unsubscribe) | (Self::Unsubscribed, _) => Self::Unsubscribed,
            (_, CommandType::Pause) => Self::Paused,
            (_, CommandType::Resume) => Self::Active,
        }
    }

    /// Whether this connection drains and sends.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// One decoded inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// A recognized client command.
    Command(CommandType),
    /// Anything else. Causes no transition.
    Unrecognized,
}

impl Inbound {
    /// Decode a JSON text frame.
    pub fn parse(text: &str) -> Self {
        serde_json::from_str::<ClientCommand>(text)
            .map_or(Self::Unrecognized, |frame| Self::Command(frame.command))
    }
}

/// A bidirectional stream transport.
pub trait CommandStream: Send {
    /// Wait for the next inbound frame.
    ///
    /// `Ok(None)` means the peer closed the stream.
    fn next_inbound(&mut self) -> impl Future<Output = Result<Option<Inbound>, StreamError>> + Send;

    /// Send one snapshot to the peer.
    fn send_state(&mut self, state: &UniverseState) -> impl Future<Output = Result<(), StreamError>> + Send;
}

/// Counters for a finished stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// State when the stream ended.
    pub state: StreamState,
    /// Inbound frames read.
    pub received: u64,
    /// Snapshots sent.
    pub sent: u64,
}

/// Run the protocol loop until the peer closes the stream or a transport
/// call fails.
///
/// End of stream returns `Ok`; read and send failures are returned as-is
/// and end the loop.
pub async fn run_stream<S: CommandStream>(
    stream: &mut S,
    updates: &UpdateDistribution,
) -> Result<StreamReport, StreamError> {
    let mut report = StreamReport::default();

    while let Some(inbound) = stream.next_inbound().await? {
        report.received = report.received.saturating_add(1);

        match inbound {
            Inbound::Command(command) => {
                let next = report.state.apply(command);
                if next != report.state {
                    debug!(?command, from = ?report.state, to = ?next, "stream state changed");
                }
                report.state = next;
            }
            Inbound::Unrecognized => trace!("unrecognized stream frame"),
        }

        let pending = if report.state.is_active() {
            updates.drain()
        } else {
            None
        };
        if let Some(snapshot) = pending {
            stream.send_state(&snapshot).await?;
            report.sent = report.sent.saturating_add(1);
        }
    }

    debug!(received = report.received, sent = report.sent, "stream closed by peer");
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::VecDeque;

    use utte_types::{Planet, PlanetType, PlanetView};

    use super::*;

    enum Step {
        /// Optionally publish a snapshot with this planet name, then deliver.
        Frame(Option<&'static str>, Inbound),
        ReadError,
    }

    struct ScriptedStream {
        steps: VecDeque<Step>,
        updates: UpdateDistribution,
        sent: Vec<UniverseState>,
        fail_sends: bool,
    }

    impl ScriptedStream {
        fn new(updates: &UpdateDistribution, steps: Vec<Step>) -> Self {
            Self {
                steps: steps.into(),
                updates: updates.clone(),
                sent: Vec::new(),
                fail_sends: false,
            }
        }

        fn sent_names(&self) -> Vec<String> {
            self.sent
                .iter()
                .map(|state| state.planets.planets[0].name.clone())
                .collect()
        }
    }

    fn publish(updates: &UpdateDistribution, name: &str) {
        let planet = Planet::new(name, PlanetType::TerraLike);
        updates.publish(vec![PlanetView::from_planet(&planet, &[])], Vec::new(), Vec::new());
    }

    impl CommandStream for ScriptedStream {
        fn next_inbound(&mut self) -> impl Future<Output = Result<Option<Inbound>, StreamError>> + Send {
            let result = match self.steps.pop_front() {
                None => Ok(None),
                Some(Step::ReadError) => Err(StreamError::Receive(String::from("reset"))),
                Some(Step::Frame(name, inbound)) => {
                    if let Some(name) = name {
                        publish(&self.updates, name);
                    }
                    Ok(Some(inbound))
                }
            };
            std::future::ready(result)
        }

        fn send_state(&mut self, state: &UniverseState) -> impl Future<Output = Result<(), StreamError>> + Send {
            let result = if self.fail_sends {
                Err(StreamError::Send(String::from("broken pipe")))
            } else {
                self.sent.push(state.clone());
                Ok(())
            };
            std::future::ready(result)
        }
    }

    const SUBSCRIBE: Inbound = Inbound::Command(CommandType::Subscribe);
    const PAUSE: Inbound = Inbound::Command(CommandType::Pause);
    const RESUME: Inbound = Inbound::Command(CommandType::Resume);
    const UNSUBSCRIBE: Inbound = Inbound::Command(CommandType::Unsubscribe);

    #[test]
    fn transitions() {
        use StreamState::{Active, Paused, Unsubscribed};

        assert_eq!(Unsubscribed.apply(CommandType::Subscribe), Active);
        assert_eq!(Paused.apply(CommandType::Subscribe), Active);
        assert_eq!(Active.apply(CommandType::Pause), Paused);
        assert_eq!(Paused.apply(CommandType::Pause), Paused);
        assert_eq!(Unsubscribed.apply(CommandType::Pause), Unsubscribed);
        assert_eq!(Paused.apply(CommandType::Resume), Active);
        assert_eq!(Active.apply(CommandType::Resume), Active);
        assert_eq!(Unsubscribed.apply(CommandType::Resume), Unsubscribed);
        assert_eq!(Active.apply(CommandType::Unsubscribe), Unsubscribed);
        assert_eq!(Paused.apply(CommandType::Unsubscribe), Unsubscribed);
    }

    #[test]
    fn parse_frames() {
        assert_eq!(Inbound::parse(r#"{"type":"PAUSE"}"#), PAUSE);
        assert_eq!(Inbound::parse(r#"{"command":"RESUME"}"#), RESUME);
        assert_eq!(Inbound::parse(r#"{"type":"JUMP"}"#), Inbound::Unrecognized);
        assert_eq!(Inbound::parse("hello"), Inbound::Unrecognized);
    }

    #[tokio::test]
    async fn nothing_sent_before_subscribe() {
        let updates = UpdateDistribution::new();
        let mut stream = ScriptedStream::new(
            &updates,
            vec![
                Step::Frame(Some("first"), Inbound::Unrecognized),
                Step::Frame(Some("second"), PAUSE),
                Step::Frame(Some("third"), RESUME),
                Step::Frame(None, SUBSCRIBE),
            ],
        );
        let report = run_stream(&mut stream, &updates).await.unwrap();
        assert_eq!(report.received, 4);
        // Only the subscribe drains, and it finds the latest snapshot.
        assert_eq!(stream.sent_names(), ["third"]);
        assert_eq!(report.state, StreamState::Active);
    }

    #[tokio::test]
    async fn pause_stops_and_resume_restarts() {
        let updates = UpdateDistribution::new();
        let mut stream = ScriptedStream::new(
            &updates,
            vec![
                Step::Frame(Some("t1"), SUBSCRIBE),
                Step::Frame(Some("t2"), PAUSE),
                Step::Frame(Some("t3"), PAUSE),
                Step::Frame(Some("t4"), RESUME),
                Step::Frame(Some("t5"), Inbound::Unrecognized),
                Step::Frame(Some("t6"), UNSUBSCRIBE),
            ],
        );
        let report = run_stream(&mut stream, &updates).await.unwrap();
        assert_eq!(stream.sent_names(), ["t1", "t4", "t5"]);
        assert_eq!(report.sent, 3);
        assert_eq!(report.state, StreamState::Unsubscribed);
        // The unsubscribed connection left t6 pending.
        assert!(updates.planets().is_occupied());
    }

    #[tokio::test]
    async fn empty_slot_sends_nothing() {
        let updates = UpdateDistribution::new();
        let mut stream = ScriptedStream::new(
            &updates,
            vec![Step::Frame(None, SUBSCRIBE), Step::Frame(None, RESUME)],
        );
        let report = run_stream(&mut stream, &updates).await.unwrap();
        assert_eq!(report.sent, 0);
        assert!(stream.sent.is_empty());
    }

    #[tokio::test]
    async fn read_error_ends_loop() {
        let updates = UpdateDistribution::new();
        let mut stream = ScriptedStream::new(
            &updates,
            vec![
                Step::Frame(Some("t1"), SUBSCRIBE),
                Step::ReadError,
                Step::Frame(Some("t2"), RESUME),
            ],
        );
        let result = run_stream(&mut stream, &updates).await;
        assert!(matches!(result, Err(StreamError::Receive(_))));
        assert_eq!(stream.sent_names(), ["t1"]);
        assert_eq!(stream.steps.len(), 1);
    }

    #[tokio::test]
    async fn send_failure_ends_loop() {
        let updates = UpdateDistribution::new();
        let mut stream = ScriptedStream::new(
            &updates,
            vec![Step::Frame(Some("t1"), SUBSCRIBE), Step::Frame(Some("t2"), RESUME)],
        );
        stream.fail_sends = true;
        let result = run_stream(&mut stream, &updates).await;
        assert!(matches!(result, Err(StreamError::Send(_))));
        assert_eq!(stream.steps.len(), 1);
    }
}
