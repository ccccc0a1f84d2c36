pub mod sales_data;
pub mod slack_message;
pub mod team_data;
