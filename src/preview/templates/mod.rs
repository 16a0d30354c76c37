pub mod classic;
pub mod creative;
pub mod executive;
pub mod minimalist;
pub mod modern;
