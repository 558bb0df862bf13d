pub mod location;
pub mod meetups;
pub mod movies;
pub mod restaurants;
pub mod trails;
pub mod weather;

pub use location::LocationProvider;
pub use meetups::MeetupsProvider;
pub use movies::MoviesProvider;
pub use restaurants::RestaurantsProvider;
pub use trails::TrailsProvider;
pub use weather::WeatherProvider;
