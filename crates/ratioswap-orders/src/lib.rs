mod orderbook;

pub use orderbook::OrderBook;
