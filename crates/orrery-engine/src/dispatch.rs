//! Outbound event selection.
//!
//! Tracks the per-session dispatch history (not-started → started)
//! and the one-shot stop latch, and picks the event kind and payload
//! shape for each satisfied step:
//!
//! | status            | started | protocol | event            | payload   |
//! |-------------------|---------|----------|------------------|-----------|
//! | running, gated ok | no      | any      | START_SIMULATION | scene     |
//! | running, gated ok | yes     | binary   | SCENE_UPDATE     | particles |
//! | running, gated ok | yes     | text     | SCENE_UPDATE     | scene     |
//! | stopped           | any     | any      | STOP_SIMULATION  | none      |

use tracing::{debug, info};

use orrery_core::event::{SimulationEvent, UpdatePayload};
use orrery_core::traits::UpdateListener;

use crate::config::ProtocolMode;

pub(crate) struct EventDispatcher {
    protocol: ProtocolMode,
    request_id: String,
    started: bool,
    stop_sent: bool,
}

impl EventDispatcher {
    pub fn new(protocol: ProtocolMode, request_id: String) -> Self {
        Self {
            protocol,
            request_id,
            started: false,
            stop_sent: false,
        }
    }

    /// Dispatch the event for one satisfied step with a fresh scene.
    /// Returns the kind that was sent.
    pub fn dispatch_update(
        &mut self,
        listener: &dyn UpdateListener,
        scene: String,
        particles: Vec<f64>,
    ) -> SimulationEvent {
        if !self.started {
            listener.update_ready(
                SimulationEvent::StartSimulation,
                &self.request_id,
                UpdatePayload::Scene(scene),
            );
            self.started = true;
            info!(request_id = %self.request_id, "first update sent to observer");
            SimulationEvent::StartSimulation
        } else {
            let payload = match self.protocol {
                ProtocolMode::Binary => UpdatePayload::Particles(particles),
                ProtocolMode::Text => UpdatePayload::Scene(scene),
            };
            listener.update_ready(SimulationEvent::SceneUpdate, &self.request_id, payload);
            debug!(request_id = %self.request_id, "update sent to observer");
            SimulationEvent::SceneUpdate
        }
    }

    /// Dispatch the one-shot stop notification. Returns `false` if it
    /// was already sent for this session.
    pub fn dispatch_stop(&mut self, listener: &dyn UpdateListener) -> bool {
        if self.stop_sent {
            return false;
        }
        listener.update_ready(
            SimulationEvent::StopSimulation,
            &self.request_id,
            UpdatePayload::Empty,
        );
        self.stop_sent = true;
        // Stopping also marks the session started, suppressing any
        // later START.
        self.started = true;
        info!(request_id = %self.request_id, "stop notification sent to observer");
        true
    }

    #[cfg(test)]
    pub fn started(&self) -> bool {
        self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_test_utils::RecordingListener;

    fn dispatcher(protocol: ProtocolMode) -> EventDispatcher {
        EventDispatcher::new(protocol, "req-1".to_string())
    }

    #[test]
    fn first_update_is_start_with_scene() {
        let listener = RecordingListener::new();
        let mut d = dispatcher(ProtocolMode::Binary);
        let sent = d.dispatch_update(&listener, "scene-0".into(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(sent, SimulationEvent::StartSimulation);
        let events = listener.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].request_id, "req-1");
        assert_eq!(events[0].payload, UpdatePayload::Scene("scene-0".into()));
    }

    #[test]
    fn binary_mode_sends_particles_after_start() {
        let listener = RecordingListener::new();
        let mut d = dispatcher(ProtocolMode::Binary);
        d.dispatch_update(&listener, "scene-0".into(), vec![]);
        let sent = d.dispatch_update(&listener, "scene-1".into(), vec![0.5, 0.0, 0.0, 0.0]);
        assert_eq!(sent, SimulationEvent::SceneUpdate);
        assert_eq!(
            listener.events()[1].payload,
            UpdatePayload::Particles(vec![0.5, 0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn text_mode_sends_scene_after_start() {
        let listener = RecordingListener::new();
        let mut d = dispatcher(ProtocolMode::Text);
        d.dispatch_update(&listener, "scene-0".into(), vec![]);
        d.dispatch_update(&listener, "scene-1".into(), vec![0.5, 0.0, 0.0, 0.0]);
        assert_eq!(
            listener.events()[1].payload,
            UpdatePayload::Scene("scene-1".into())
        );
    }

    #[test]
    fn stop_is_one_shot() {
        let listener = RecordingListener::new();
        let mut d = dispatcher(ProtocolMode::Binary);
        assert!(d.dispatch_stop(&listener));
        assert!(!d.dispatch_stop(&listener));
        let events = listener.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, SimulationEvent::StopSimulation);
        assert_eq!(events[0].payload, UpdatePayload::Empty);
    }

    #[test]
    fn stop_marks_the_session_started() {
        let listener = RecordingListener::new();
        let mut d = dispatcher(ProtocolMode::Binary);
        d.dispatch_stop(&listener);
        assert!(d.started());
    }
}
