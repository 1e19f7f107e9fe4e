pub use genolab_core::{GeneLogic, GenomeLogic};
pub mod gene {
    pub use genolab_core::gene::*;
    pub use genolab_data::gene::*;
}
pub mod genome {
    pub use genolab_core::genome::*;
}
pub mod config {
    pub use genolab_core::config::*;
}
pub mod error {
    pub use genolab_core::error::*;
}
pub mod phenotype {
    pub use genolab_core::phenotype::*;
}
pub mod state {
    pub use genolab_core::state::*;
}
pub mod steering {
    pub use genolab_core::steering::*;
}
pub mod organism {
    pub use genolab_core::organism::*;
}
pub mod metrics {
    pub use genolab_core::metrics::*;
}
pub mod persistence {
    pub use genolab_io::persistence::*;
}
pub mod serialization {
    pub use genolab_io::serialization::*;
}
