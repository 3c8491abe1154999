//! Channel-backed observer listener.

use crossbeam_channel::{Receiver, Sender};

use orrery_core::event::{SimulationEvent, UpdateEvent, UpdatePayload};
use orrery_core::traits::UpdateListener;

/// [`UpdateListener`] that forwards every event into a bounded
/// crossbeam channel.
///
/// Events arrive on the receiver in production order, exactly one per
/// satisfied step. When the channel is full the update thread blocks,
/// so channel capacity acts as observer back-pressure; when the
/// receiver is dropped, blocked sends return and further events are
/// discarded.
///
/// A blocked send cannot be interrupted by
/// [`UpdateScheduler::stop`](crate::UpdateScheduler::stop). Keep the
/// receiver drained, or drop it before joining the scheduler, or the
/// join waits on a send that only the receiver can release.
pub struct ChannelListener {
    tx: Sender<UpdateEvent>,
}

impl ChannelListener {
    /// Create a listener and its receiving end with the given
    /// capacity.
    pub fn bounded(capacity: usize) -> (Self, Receiver<UpdateEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl UpdateListener for ChannelListener {
    fn update_ready(&self, event: SimulationEvent, request_id: &str, payload: UpdatePayload) {
        // Best-effort: the observer may have dropped its receiver.
        let _ = self.tx.send(UpdateEvent {
            event,
            request_id: request_id.to_string(),
            payload,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (listener, rx) = ChannelListener::bounded(4);
        listener.update_ready(SimulationEvent::StartSimulation, "r", UpdatePayload::Empty);
        listener.update_ready(SimulationEvent::SceneUpdate, "r", UpdatePayload::Empty);
        assert_eq!(rx.recv().unwrap().event, SimulationEvent::StartSimulation);
        assert_eq!(rx.recv().unwrap().event, SimulationEvent::SceneUpdate);
    }

    #[test]
    fn dropped_receiver_discards_events() {
        let (listener, rx) = ChannelListener::bounded(1);
        drop(rx);
        // Must not panic or block.
        listener.update_ready(SimulationEvent::StopSimulation, "r", UpdatePayload::Empty);
    }

    #[test]
    fn dropped_receiver_unblocks_a_full_channel() {
        let (listener, rx) = ChannelListener::bounded(1);
        listener.update_ready(SimulationEvent::SceneUpdate, "r", UpdatePayload::Empty);

        // The channel is full; this send blocks until the receiver
        // goes away.
        let sender = std::thread::spawn(move || {
            listener.update_ready(SimulationEvent::SceneUpdate, "r", UpdatePayload::Empty);
        });
        std::thread::sleep(std::time::Duration::from_millis(50));
        drop(rx);
        sender.join().unwrap();
    }
}
