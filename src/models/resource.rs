use serde::Deserialize;

/// The six cached domains. Used for TTL lookup and log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Locations,
    Weather,
    Restaurants,
    Movies,
    Meetups,
    Trails,
}

impl ResourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Locations => "locations",
            Self::Weather => "weather",
            Self::Restaurants => "restaurants",
            Self::Movies => "movies",
            Self::Meetups => "meetups",
            Self::Trails => "trails",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The query every derived resource is fetched with: a geocoded place.
/// Clients send the location object they got from `/location`; any extra
/// fields it carries are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationPoint {
    pub search_query: String,
    pub latitude: f64,
    pub longitude: f64,
}
