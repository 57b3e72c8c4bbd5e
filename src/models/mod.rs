pub mod course;
pub mod time;

pub use course::{Course, Meeting, MeetingWindow, Section};
pub use time::{TimeOfDay, TimeWindow, Weekday};
