use std::time::{Duration, Instant};

pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: Instant,
}

/// Transient notifications, newest last.
#[derive(Debug, Clone, Default)]
pub struct Toasts {
    entries: Vec<Toast>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        self.entries.push(Toast {
            level,
            message,
            created_at: Instant::now(),
        });
    }

    pub fn prune(&mut self, now: Instant) {
        self.entries
            .retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_TTL);
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_drops_expired_toasts() {
        let mut toasts = Toasts::default();
        toasts.success("Aluno deletado com sucesso");
        toasts.prune(Instant::now());
        assert_eq!(toasts.entries().len(), 1);

        toasts.prune(Instant::now() + TOAST_TTL);
        assert!(toasts.entries().is_empty());
    }
}
