pub mod contact;
pub mod contact_status;
pub mod device_info;
pub mod location_info;
pub mod new_subscriber;
pub mod sanitize;
pub mod subscribe_source;
pub mod subscriber;
pub mod subscriber_email;
pub mod subscriber_status;
