pub mod availability;
pub mod collection;
pub mod genre;
pub mod list;
pub mod mode;
pub mod movie;
pub mod release_date;

pub use availability::{AvailabilityKind, Provider, RegionAvailability, WatchAvailability};
pub use collection::{Collection, CollectionPart};
pub use genre::{Genre, GenreCatalog};
pub use list::{
    CreatedList, ListEntry, ListItem, ListItemsPage, NamedList, Page, WriteOutcome,
    SORT_BY_RELEASE_DATE_DESC,
};
pub use mode::ProviderMode;
pub use movie::{Movie, MovieId};
