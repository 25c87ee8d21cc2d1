//! Transient success/error banner.
//!
//! The banner is a fixed-position overlay, so the page underneath stays
//! usable while it is shown. It clears itself after a timeout or when the
//! close button is pressed.

use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::AppConfig;

static NEXT_NOTICE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_NOTICE.fetch_add(1, Ordering::Relaxed),
            kind,
            message: message.into(),
        }
    }
}

/// Run `f` once after `ms` milliseconds.
pub fn after_delay(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = wasm_bindgen::closure::Closure::once(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        ms,
    );
    callback.forget();
}

/// Handle a page uses to raise banners.
#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<Notice>>,
    success_ms: i32,
    error_ms: i32,
}

impl Notifier {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            current: RwSignal::new(None),
            success_ms: config.notify_success_ms,
            error_ms: config.notify_error_ms,
        }
    }

    pub fn success_ms(&self) -> i32 {
        self.success_ms
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Notice::new(NoticeKind::Success, message), self.success_ms);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Notice::new(NoticeKind::Error, message), self.error_ms);
    }

    /// A newer notice is never cleared by an older one's timer.
    fn show(&self, notice: Notice, ms: i32) {
        let id = notice.id;
        self.current.set(Some(notice));
        let current = self.current;
        after_delay(ms, move || {
            current.try_update(|slot| {
                if slot.as_ref().map(|n| n.id) == Some(id) {
                    *slot = None;
                }
            });
        });
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

#[component]
pub fn Notification(notifier: Notifier) -> impl IntoView {
    move || {
        notifier.current.get().map(|notice| {
            let (class, icon) = match notice.kind {
                NoticeKind::Success => ("notification notification-success", "\u{2714}"),
                NoticeKind::Error => ("notification notification-error", "\u{26A0}"),
            };
            view! {
                <div class=class role="status">
                    <span class="notification-icon">{icon}</span>
                    <span class="notification-message">{notice.message}</span>
                    <button
                        class="notification-close"
                        aria-label="close notification"
                        on:click=move |_| notifier.dismiss()
                    >
                        "\u{2715}"
                    </button>
                </div>
            }
        })
    }
}
