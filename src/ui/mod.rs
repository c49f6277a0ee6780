pub mod charts;
pub mod fonts;
pub mod karte;
pub mod panels;
pub mod table;
