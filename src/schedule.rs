/// Frame scheduling and event coalescing.
pub mod frame;
