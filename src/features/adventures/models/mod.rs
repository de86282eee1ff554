mod adventure;

pub use adventure::*;
