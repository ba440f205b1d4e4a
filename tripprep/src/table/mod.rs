mod trip_table;

pub use trip_table::TripTable;
