//! Services for lot editing and aggregation

pub mod catalog;
pub mod drawer;
pub mod lot_aggregator;
pub mod lot_file;
pub mod measure;

pub use catalog::SizeCatalog;
pub use drawer::{DrawerHost, DrawerProps, LotDrawer};
pub use lot_aggregator::LotSizeAggregator;
