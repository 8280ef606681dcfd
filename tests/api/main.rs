mod contact;
mod health_check;
mod helpers;
mod stats;
mod subscriptions;
