//! Data structures for prescale tables and trigger menus.

pub mod menu;
pub mod table;
pub mod value;

pub use menu::MenuSeed;
pub use table::{PrescaleTable, Row};
pub use value::{CellValue, Prescale};
