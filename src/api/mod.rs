// Thin namespace wrapper for API-layer components
pub mod handlers {
    pub use crate::handlers::*;
}

pub mod guard {
    pub use crate::guard::*;
}

pub mod routes {
    pub use crate::routes::*;
}
