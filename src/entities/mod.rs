pub mod location;
pub mod meetup;
pub mod movie;
pub mod restaurant;
pub mod trail;
pub mod weather;
