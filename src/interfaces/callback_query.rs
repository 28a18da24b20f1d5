use crate::domain::callback::CallbackNotification;
use crate::error::{GatewayError, Result};
use tracing::warn;

/// Decodes the query string of an inbound notification (`cmd`, `args`, `sign`).
///
/// A leading `?` is accepted and unknown keys are ignored. A query that cannot be
/// decoded, e.g. one repeating a key, is treated as an authentication failure.
pub fn parse_callback_query(raw: &str) -> Result<CallbackNotification> {
    let query = raw.strip_prefix('?').unwrap_or(raw);
    serde_urlencoded::from_str(query).map_err(|e| {
        warn!(error = %e, "undecodable callback query");
        GatewayError::Authentication
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query() {
        let notification = parse_callback_query(
            "?cmd=statusChange&args=PAY123&sign=c9f7a8c636d4beb7c285f1f5f4fad75ecd216f2c",
        )
        .unwrap();
        assert_eq!(
            notification,
            CallbackNotification::new(
                "statusChange",
                "PAY123",
                "c9f7a8c636d4beb7c285f1f5f4fad75ecd216f2c"
            )
        );
    }

    #[test]
    fn test_missing_keys_stay_absent() {
        let notification = parse_callback_query("cmd=statusChange&extra=1").unwrap();
        assert_eq!(notification.cmd.as_deref(), Some("statusChange"));
        assert_eq!(notification.args, None);
        assert_eq!(notification.sign, None);
    }

    #[test]
    fn test_percent_decoding() {
        let notification = parse_callback_query("args=PAY%2F1&cmd=status+change").unwrap();
        assert_eq!(notification.args.as_deref(), Some("PAY/1"));
        assert_eq!(notification.cmd.as_deref(), Some("status change"));
    }

    #[test]
    fn test_repeated_key_is_rejected() {
        let result = parse_callback_query("args=PAY1&args=PAY2&cmd=x&sign=y");
        assert!(matches!(result, Err(GatewayError::Authentication)));
    }
}
