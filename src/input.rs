use crossterm::event::{self, Event};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn next_terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Pumps events from `next_event` into `tx` until the receiving side goes
/// away or the source fails. `next_event` must return within a bounded time
/// so a closed channel is noticed.
pub fn forward_events<F>(mut next_event: F, tx: UnboundedSender<Event>)
where
    F: FnMut() -> io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        match next_event() {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => {
                warn!(%err, "terminal input failed");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    fn key(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
    }

    #[test]
    fn stops_without_reading_once_the_receiver_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut calls = 0;
        forward_events(
            || {
                calls += 1;
                Ok(None)
            },
            tx,
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn idle_polls_notice_a_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let mut rx = Some(rx);
        let mut calls = 0;
        forward_events(
            || {
                calls += 1;
                if calls == 3 {
                    rx.take();
                }
                Ok(None)
            },
            tx,
        );
        assert_eq!(calls, 3);
    }

    #[test]
    fn forwards_events_until_the_source_fails() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut pending = vec![key('b'), key('a')];
        forward_events(
            || match pending.pop() {
                Some(event) => Ok(Some(event)),
                None => Err(io::Error::other("tty closed")),
            },
            tx,
        );
        assert_eq!(rx.try_recv().ok(), Some(key('a')));
        assert_eq!(rx.try_recv().ok(), Some(key('b')));
        assert!(rx.try_recv().is_err());
    }
}
