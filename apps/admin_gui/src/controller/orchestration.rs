//! Hands commands produced by the reducer to the backend worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue full");
            *status = "Fila de comandos cheia; tente novamente".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend worker disconnected");
            *status = "Backend command processor disconnected; reinicie o painel".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::StudentId;

    #[test]
    fn full_queue_reports_status_instead_of_blocking() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::DeleteStudent(StudentId(1)), &mut status);
        assert!(status.is_empty());
        dispatch_backend_command(&cmd_tx, BackendCommand::DeleteStudent(StudentId(2)), &mut status);
        assert!(status.contains("cheia"));

        assert_eq!(
            cmd_rx.try_recv().ok(),
            Some(BackendCommand::DeleteStudent(StudentId(1)))
        );
    }

    #[test]
    fn dropped_worker_is_reported() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut status = String::new();

        dispatch_backend_command(&cmd_tx, BackendCommand::DeleteStudent(StudentId(1)), &mut status);
        assert!(status.contains("disconnected"));
    }
}
