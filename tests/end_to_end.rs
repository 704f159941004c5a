use std::{collections::HashSet, future::Future, net::SocketAddr, pin::Pin, time::Duration};

use input_event::{Button, RawInputEvent, Stick, Trigger};
use input_listener::{DeviceInputError, DeviceInputStream, EventBatch, EventCapture};
use input_simulator::{DeviceOutputError, VirtualGamepad};
use network::{udp::UdpEventReceiver, udp::UdpEventSender, WireFormat};
use receiver::{listener::input_event_processor, Normalizer};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use transmitter::sender::input_event_forwarder;

/// What the virtual device showed after one commit.
#[derive(Debug, Clone, Default, PartialEq)]
struct Frame {
    left: (f32, f32),
    right: (f32, f32),
    triggers: (u8, u8),
    buttons: HashSet<Button>,
}

/// Records a frame per commit and cancels once `expected` frames exist.
/// The release on shutdown adds one more.
struct RecordingGamepad {
    staged: Frame,
    frames: Vec<Frame>,
    expected: usize,
    done: CancellationToken,
}

impl RecordingGamepad {
    fn new(expected: usize, done: CancellationToken) -> Self {
        RecordingGamepad {
            staged: Frame::default(),
            frames: Vec::new(),
            expected,
            done,
        }
    }
}

impl VirtualGamepad for RecordingGamepad {
    fn set_stick(&mut self, stick: Stick, x: f32, y: f32) -> Result<(), DeviceOutputError> {
        match stick {
            Stick::Left => self.staged.left = (x, y),
            Stick::Right => self.staged.right = (x, y),
        }
        Ok(())
    }

    fn set_trigger(&mut self, trigger: Trigger, value: u8) -> Result<(), DeviceOutputError> {
        match trigger {
            Trigger::Left => self.staged.triggers.0 = value,
            Trigger::Right => self.staged.triggers.1 = value,
        }
        Ok(())
    }

    fn set_button(&mut self, button: Button, pressed: bool) -> Result<(), DeviceOutputError> {
        if pressed {
            self.staged.buttons.insert(button);
        } else {
            self.staged.buttons.remove(&button);
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DeviceOutputError> {
        self.frames.push(self.staged.clone());
        if self.frames.len() == self.expected {
            self.done.cancel();
        }
        Ok(())
    }
}

async fn bound_receiver() -> (UdpEventReceiver, SocketAddr) {
    let receiver = UdpEventReceiver::bind("127.0.0.1:0", WireFormat::Json)
        .await
        .unwrap();
    let addr = receiver.local_addr().unwrap();
    (receiver, addr)
}

/// Sends raw datagrams to a fresh receiver and returns the frames it committed.
async fn relay_datagrams(datagrams: &[&[u8]], expected_frames: usize) -> Vec<Frame> {
    let (mut receiver, addr) = bound_receiver().await;
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    for datagram in datagrams {
        socket.send_to(datagram, addr).await.unwrap();
    }

    let token = CancellationToken::new();
    let mut normalizer = Normalizer::new(RecordingGamepad::new(expected_frames, token.clone()));
    tokio::time::timeout(
        Duration::from_secs(5),
        input_event_processor(&mut receiver, &mut normalizer, token),
    )
    .await
    .expect("receiver did not commit the expected frames")
    .unwrap();

    // the last frame is the release on shutdown
    let mut frames = normalizer.gamepad().frames.clone();
    assert_eq!(frames.pop(), Some(Frame::default()));
    frames
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{} is not close to {}",
        actual,
        expected
    );
}

#[tokio::test]
async fn button_press_and_release() {
    let frames = relay_datagrams(
        &[
            br#"{"type":1,"code":304,"value":1}"#,
            br#"{"type":1,"code":304,"value":0}"#,
        ],
        2,
    )
    .await;

    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buttons, HashSet::from([Button::A]));
    assert!(frames[1].buttons.is_empty());
}

#[tokio::test]
async fn stick_halves_update_independently() {
    let frames = relay_datagrams(
        &[
            br#"{"type":3,"code":0,"value":16383}"#,
            br#"{"type":3,"code":1,"value":-16383}"#,
        ],
        2,
    )
    .await;

    let (x, y) = frames[0].left;
    assert_close(x, 0.5);
    assert_eq!(y, 0.0);

    let (x, y) = frames[1].left;
    assert_close(x, 0.5);
    assert_close(y, 0.5);
    assert_eq!(frames[1].right, (0.0, 0.0));
}

#[tokio::test]
async fn malformed_datagram_does_not_stop_the_receiver() {
    let frames = relay_datagrams(
        &[
            b"{\"type\":1,",
            b"",
            br#"{"type":3,"code":5,"value":1023}"#,
        ],
        1,
    )
    .await;

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].triggers, (0, 255));
}

#[tokio::test]
async fn unmapped_channels_still_flush_the_same_state() {
    let frames = relay_datagrams(
        &[
            br#"{"type":1,"code":315,"value":1}"#,
            br#"{"type":1,"code":306,"value":1}"#,
            br#"{"type":0,"code":0,"value":0}"#,
        ],
        3,
    )
    .await;

    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1], frames[0]);
    assert_eq!(frames[2], frames[0]);
    assert!(frames[0].buttons.contains(&Button::Start));
}

#[tokio::test]
async fn hat_events_move_the_dpad() {
    let frames = relay_datagrams(
        &[
            br#"{"type":3,"code":16,"value":-1}"#,
            br#"{"type":3,"code":17,"value":1}"#,
            br#"{"type":3,"code":16,"value":0}"#,
        ],
        3,
    )
    .await;

    assert_eq!(frames[0].buttons, HashSet::from([Button::DPadLeft]));
    assert_eq!(
        frames[1].buttons,
        HashSet::from([Button::DPadLeft, Button::DPadDown])
    );
    assert_eq!(frames[2].buttons, HashSet::from([Button::DPadDown]));
}

struct Scripted {
    batches: Vec<EventBatch>,
}

impl EventCapture for Scripted {
    fn poll_events(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<EventBatch, DeviceInputError>> + Send + '_>> {
        Box::pin(async move {
            if self.batches.is_empty() {
                std::future::pending().await
            } else {
                Ok(self.batches.remove(0))
            }
        })
    }

    fn grab_device(&mut self) -> Result<(), DeviceInputError> {
        Ok(())
    }

    fn ungrab_device(&mut self) -> Result<(), DeviceInputError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[tokio::test]
async fn transmitter_drives_the_receiver() {
    let (mut receiver, addr) = bound_receiver().await;
    let mut sender = UdpEventSender::connect(addr, WireFormat::Json)
        .await
        .unwrap();
    let mut capture = DeviceInputStream::new(Scripted {
        batches: vec![
            vec![RawInputEvent::axis(3, -32767), RawInputEvent::axis(4, 32767)],
            vec![RawInputEvent::key(308, 1), RawInputEvent::axis(2, 512)],
        ],
    });

    let token = CancellationToken::new();
    let mut normalizer = Normalizer::new(RecordingGamepad::new(4, token.clone()));

    let transmit = input_event_forwarder(&mut capture, &mut sender, token.clone());
    let receive = input_event_processor(&mut receiver, &mut normalizer, token);
    let (transmitted, received) =
        tokio::time::timeout(Duration::from_secs(5), async { tokio::join!(transmit, receive) })
            .await
            .expect("relay did not finish");
    transmitted.unwrap();
    received.unwrap();

    let frames = &normalizer.gamepad().frames;
    assert_eq!(frames.len(), 5);
    let last = &frames[3];
    assert_eq!(last.right, (-1.0, -1.0));
    assert!(last.buttons.contains(&Button::Y));
    assert_eq!(last.triggers, (128, 0));
    assert_eq!(frames[4], Frame::default());
}
