//! Urgency tracking
//!
//! Keeps the set of windows currently tagged urgent and applies one transition
//! per event:
//!
//! | Event | Member? | Action |
//! |---|---|---|
//! | `Urgent(a)` | any | insert `a`, add tag |
//! | `ActiveWindowChanged(a)` | yes | remove tag, drop `a` |
//! | `WindowClosed(a)` | yes | drop `a` (the window is gone, no command) |
//! | anything else | - | ignored |
//!
//! Tag commands are fire-and-forget. A failure is logged and surfaced as a
//! notification, and the set is left as already mutated.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::Config;
use crate::hypr::{CommandSender, Event, EventHandler, HyprError, NotifyIcon, WindowAddress};

/// Dispatcher used to add and remove window tags
const TAG_DISPATCHER: &str = "tagwindow";

/// How tags are named and how failures are reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Tag toggled on urgent windows
    pub tag: String,
    /// Failure notification settings, `None` to only log
    pub notify: Option<FailureNotice>,
}

/// Parameters for the failure notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub timeout_ms: u64,
    pub color: String,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            tag: "urgent".to_string(),
            notify: Some(FailureNotice {
                timeout_ms: 1500,
                color: "0".to_string(),
            }),
        }
    }
}

impl From<&Config> for TrackerOptions {
    fn from(config: &Config) -> Self {
        Self {
            tag: config.tag.clone(),
            notify: config.notify.enabled.then(|| FailureNotice {
                timeout_ms: config.notify.timeout_ms,
                color: config.notify.color.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TagChange {
    Add,
    Remove,
}

impl TagChange {
    fn sign(self) -> char {
        match self {
            TagChange::Add => '+',
            TagChange::Remove => '-',
        }
    }

    fn verb(self) -> &'static str {
        match self {
            TagChange::Add => "adding",
            TagChange::Remove => "removing",
        }
    }
}

/// Tracks urgent windows and keeps their tag in sync
pub struct UrgencyTracker<C> {
    commands: C,
    options: TrackerOptions,
    urgent: HashSet<WindowAddress>,
}

impl<C: CommandSender> UrgencyTracker<C> {
    /// Create a tracker with an empty set
    pub fn new(commands: C, options: TrackerOptions) -> Self {
        debug!(tag = %options.tag, "UrgencyTracker::new: called");
        Self {
            commands,
            options,
            urgent: HashSet::new(),
        }
    }

    /// Apply the transition for one event
    pub async fn apply(&mut self, event: Event) {
        match event {
            Event::Urgent(address) => {
                debug!(%address, "Window became urgent");
                self.urgent.insert(address.clone());
                self.change_tag(TagChange::Add, &address).await;
            }
            Event::ActiveWindowChanged(address) => {
                if self.urgent.contains(&address) {
                    debug!(%address, "Urgent window focused");
                    self.change_tag(TagChange::Remove, &address).await;
                    self.urgent.remove(&address);
                }
            }
            Event::WindowClosed(address) => {
                if self.urgent.remove(&address) {
                    debug!(%address, "Urgent window closed");
                }
            }
            Event::Other { .. } => {}
        }
    }

    async fn change_tag(&self, change: TagChange, address: &WindowAddress) {
        let args = format!("{}{} address:{}", change.sign(), self.options.tag, address);
        if let Err(e) = self.commands.dispatch(TAG_DISPATCHER, &args).await {
            self.report_failure(change, address, &e).await;
        }
    }

    async fn report_failure(&self, change: TagChange, address: &WindowAddress, err: &HyprError) {
        let message = format!("Error {} {} tag: {}", change.verb(), self.options.tag, err);
        error!(%address, error = %err, "{}", message);

        let Some(notice) = &self.options.notify else {
            return;
        };
        if let Err(e) = self
            .commands
            .notify(NotifyIcon::Error, notice.timeout_ms, &notice.color, &message)
            .await
        {
            debug!(error = %e, "UrgencyTracker: failure notification not delivered");
        }
    }

    /// Whether `address` is currently tracked as urgent
    pub fn is_urgent(&self, address: &WindowAddress) -> bool {
        self.urgent.contains(address)
    }

    /// Number of tracked windows
    pub fn len(&self) -> usize {
        self.urgent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty()
    }

    /// Tracked addresses, sorted
    pub fn urgent_windows(&self) -> Vec<WindowAddress> {
        let mut windows: Vec<_> = self.urgent.iter().cloned().collect();
        windows.sort();
        windows
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }
}

#[async_trait]
impl<C: CommandSender> EventHandler for UrgencyTracker<C> {
    async fn handle(&mut self, event: Event) {
        self.apply(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypr::command::mock::{MockCommandSender, SentCommand};
    use proptest::prelude::*;

    fn addr(s: &str) -> WindowAddress {
        WindowAddress::new(s).unwrap()
    }

    fn tracker() -> UrgencyTracker<MockCommandSender> {
        UrgencyTracker::new(MockCommandSender::new(), TrackerOptions::default())
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let t = tracker();
        assert!(t.is_empty());
        assert!(t.commands().sent().is_empty());
    }

    #[tokio::test]
    async fn test_urgent_inserts_and_tags() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;

        assert!(t.is_urgent(&addr("0x1")));
        assert_eq!(
            t.commands().sent(),
            vec![SentCommand::Dispatch {
                dispatcher: "tagwindow".to_string(),
                args: "+urgent address:0x1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_repeated_urgent_keeps_single_membership() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::Urgent(addr("0x1"))).await;

        assert_eq!(t.len(), 1);
        assert_eq!(
            t.commands().dispatched(),
            vec!["+urgent address:0x1", "+urgent address:0x1"]
        );
    }

    #[tokio::test]
    async fn test_focus_clears_urgent_window() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::ActiveWindowChanged(addr("0x1"))).await;

        assert!(t.is_empty());
        assert_eq!(
            t.commands().dispatched(),
            vec!["+urgent address:0x1", "-urgent address:0x1"]
        );
    }

    #[tokio::test]
    async fn test_focus_on_normal_window_is_noop() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::ActiveWindowChanged(addr("0x2"))).await;

        assert!(t.is_urgent(&addr("0x1")));
        assert_eq!(t.commands().dispatched(), vec!["+urgent address:0x1"]);
    }

    #[tokio::test]
    async fn test_close_drops_without_command() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::WindowClosed(addr("0x1"))).await;

        assert!(t.is_empty());
        assert_eq!(t.commands().dispatched(), vec!["+urgent address:0x1"]);
    }

    #[tokio::test]
    async fn test_close_of_normal_window_is_noop() {
        let mut t = tracker();
        t.apply(Event::WindowClosed(addr("0x9"))).await;

        assert!(t.is_empty());
        assert!(t.commands().sent().is_empty());
    }

    #[tokio::test]
    async fn test_focus_after_close_sends_nothing() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::WindowClosed(addr("0x1"))).await;
        t.apply(Event::ActiveWindowChanged(addr("0x1"))).await;

        assert_eq!(t.commands().dispatched(), vec!["+urgent address:0x1"]);
    }

    #[tokio::test]
    async fn test_other_events_ignored() {
        let mut t = tracker();
        t.apply(Event::Other {
            name: "workspace".to_string(),
            data: "2".to_string(),
        })
        .await;

        assert!(t.is_empty());
        assert!(t.commands().sent().is_empty());
    }

    #[tokio::test]
    async fn test_failed_add_keeps_membership_and_notifies() {
        let mut t = tracker();
        t.commands().set_fail_dispatch(true);
        t.apply(Event::Urgent(addr("0x1"))).await;

        assert!(t.is_urgent(&addr("0x1")));
        let sent = t.commands().sent();
        assert_eq!(sent.len(), 2);
        match &sent[1] {
            SentCommand::Notify {
                icon,
                timeout_ms,
                color,
                message,
            } => {
                assert_eq!(*icon, NotifyIcon::Error);
                assert_eq!(*timeout_ms, 1500);
                assert_eq!(color, "0");
                assert!(message.starts_with("Error adding urgent tag: "));
                assert!(message.contains("mock dispatch failure"));
            }
            other => panic!("Expected notification, got {:?}", other),
        }

        // Later events are still processed
        t.commands().set_fail_dispatch(false);
        t.apply(Event::Urgent(addr("0x2"))).await;
        assert_eq!(t.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_remove_still_drops_membership() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.commands().set_fail_dispatch(true);
        t.apply(Event::ActiveWindowChanged(addr("0x1"))).await;

        assert!(t.is_empty());
        let notes = t.commands().notifications();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].starts_with("Error removing urgent tag: "));
    }

    #[tokio::test]
    async fn test_failed_notification_is_swallowed() {
        let mut t = tracker();
        t.commands().set_fail_dispatch(true);
        t.commands().set_fail_notify(true);
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::Urgent(addr("0x2"))).await;

        // One dispatch and one notify attempt per event, no retries
        assert_eq!(t.commands().sent().len(), 4);
        assert_eq!(t.len(), 2);
    }

    #[tokio::test]
    async fn test_notifications_can_be_disabled() {
        let options = TrackerOptions {
            notify: None,
            ..TrackerOptions::default()
        };
        let mut t = UrgencyTracker::new(MockCommandSender::new(), options);
        t.commands().set_fail_dispatch(true);
        t.apply(Event::Urgent(addr("0x1"))).await;

        assert!(t.commands().notifications().is_empty());
        assert!(t.is_urgent(&addr("0x1")));
    }

    #[tokio::test]
    async fn test_custom_tag_name() {
        let options = TrackerOptions {
            tag: "attention".to_string(),
            ..TrackerOptions::default()
        };
        let mut t = UrgencyTracker::new(MockCommandSender::new(), options);
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::ActiveWindowChanged(addr("0x1"))).await;

        assert_eq!(
            t.commands().dispatched(),
            vec!["+attention address:0x1", "-attention address:0x1"]
        );
    }

    #[tokio::test]
    async fn test_scenario_two_urgent_one_closed() {
        let mut t = tracker();
        t.apply(Event::Urgent(addr("0x1"))).await;
        t.apply(Event::Urgent(addr("0x2"))).await;
        t.apply(Event::WindowClosed(addr("0x1"))).await;

        assert_eq!(
            t.commands().dispatched(),
            vec!["+urgent address:0x1", "+urgent address:0x2"]
        );
        assert_eq!(t.urgent_windows(), vec![addr("0x2")]);
    }

    #[tokio::test]
    async fn test_handler_delegates_to_apply() {
        let mut t = tracker();
        EventHandler::handle(&mut t, Event::Urgent(addr("0x5"))).await;
        assert!(t.is_urgent(&addr("0x5")));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.tag = "ping".to_string();
        config.notify.enabled = false;

        let options = TrackerOptions::from(&config);
        assert_eq!(options.tag, "ping");
        assert!(options.notify.is_none());

        let options = TrackerOptions::from(&Config::default());
        assert_eq!(options, TrackerOptions::default());
    }

    fn run<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    proptest! {
        #[test]
        fn prop_urgent_then_focus_leaves_set_empty(hex in "[0-9a-f]{1,12}") {
            let a = addr(&hex);
            let (len_after_urgent, len_after_focus, dispatched) = run(async {
                let mut t = tracker();
                t.apply(Event::Urgent(a.clone())).await;
                let after_urgent = t.len();
                t.apply(Event::ActiveWindowChanged(a.clone())).await;
                (after_urgent, t.len(), t.commands().dispatched())
            });

            prop_assert_eq!(len_after_urgent, 1);
            prop_assert_eq!(len_after_focus, 0);
            prop_assert_eq!(
                dispatched,
                vec![format!("+urgent address:{}", a), format!("-urgent address:{}", a)]
            );
        }

        #[test]
        fn prop_membership_matches_model(ops in proptest::collection::vec((0u8..3, 0u8..4), 0..40)) {
            let (windows, model) = run(async {
                let mut t = tracker();
                let mut model = std::collections::BTreeSet::new();
                for (kind, id) in ops {
                    let a = addr(&format!("{:x}", id));
                    match kind {
                        0 => {
                            model.insert(a.clone());
                            t.apply(Event::Urgent(a)).await;
                        }
                        1 => {
                            model.remove(&a);
                            t.apply(Event::ActiveWindowChanged(a)).await;
                        }
                        _ => {
                            model.remove(&a);
                            t.apply(Event::WindowClosed(a)).await;
                        }
                    }
                }
                (t.urgent_windows(), model.into_iter().collect::<Vec<_>>())
            });

            prop_assert_eq!(windows, model);
        }
    }
}
