pub mod gap;
