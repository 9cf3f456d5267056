mod notification_id;
mod request_token;

pub use notification_id::NotificationId;
pub use request_token::RequestToken;
