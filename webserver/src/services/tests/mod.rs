//! Service tests for webserver
//!
//! Exercises both order store backends through the `OrderStore` trait.
