pub mod fastx;
pub mod io;
pub mod model;
