//! Transient status messages
//!
//! Short-lived notices anchored to the bottom of the window. Each toast
//! disappears a few seconds after it is first drawn.

use eframe::egui;

/// How long a toast stays visible, in seconds.
const TOAST_SECONDS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "\u{2713}",
            ToastKind::Error => "\u{26a0}",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Time at which the toast expires. Set on first draw.
    deadline: Option<f64>,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            deadline: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            deadline: None,
        }
    }
}

/// Draw all live toasts and drop the expired ones.
pub fn draw_toasts(ctx: &egui::Context, toasts: &mut Vec<Toast>) {
    let now = ctx.input(|i| i.time);
    for toast in toasts.iter_mut() {
        if toast.deadline.is_none() {
            toast.deadline = Some(now + TOAST_SECONDS);
        }
    }
    toasts.retain(|t| t.deadline.is_none_or(|d| d > now));
    if toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in toasts.iter() {
                let color = match toast.kind {
                    ToastKind::Success => egui::Color32::from_rgb(0x2e, 0x7d, 0x32),
                    ToastKind::Error => egui::Color32::from_rgb(0xc6, 0x28, 0x28),
                };
                egui::Frame::popup(ui.style()).fill(color).show(ui, |ui| {
                    ui.colored_label(
                        egui::Color32::WHITE,
                        format!("{} {}", toast.kind.icon(), toast.message),
                    );
                });
            }
        });

    // Wake up to clear toasts even when the user is idle.
    ctx.request_repaint_after(std::time::Duration::from_millis(250));
}
