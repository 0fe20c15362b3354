// Domain-layer modules and shared errors/models
pub mod directory {
    pub use crate::directory::*;
}

pub mod intake {
    pub use crate::intake::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod validators {
    pub use crate::validators::*;
}

pub mod errors {
    pub use crate::errors::*;
}
