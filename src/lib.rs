//! Estimation of growth parameters and extracellular fluxes from
//! time-course concentration data.
//!
//! This library fits the kinetic parameters of a microbial
//! growth/metabolite-exchange model to measured biomass and metabolite
//! concentrations, including:
//! - Loading and validating tabular time-course datasets
//! - Simulating concentration trajectories from closed-form kinetic models
//! - Building initial guesses, box constraints and weight matrices
//! - Bounded weighted least-squares optimization of the kinetic parameters

#![warn(unused_imports)]

/// Commonly used types and functionality re-exported for convenience
pub mod prelude {
    pub use crate::dataset::*;
    pub use crate::model::*;
    pub use crate::optim::*;
    pub use crate::tabular::*;
}

/// Core dataset entity
pub mod dataset;

/// Kinetic model variants and fixed parameters
pub mod model;

/// Parameter estimation: problem assembly, cost and bounded solver
pub mod optim {
    pub use crate::optim::bound::*;
    pub use crate::optim::error::*;
    pub use crate::optim::initials::*;
    pub use crate::optim::optimizers::*;
    pub use crate::optim::problem::*;
    pub use crate::optim::report::*;
    pub use crate::optim::transformation::*;
    pub use crate::optim::weights::*;
    pub use argmin::core::CostFunction;
    pub use argmin::core::Gradient;
    use argmin_math as _;

    pub mod bound;
    pub mod error;
    pub mod initials;
    pub mod problem;
    pub mod report;
    pub mod transformation;
    pub mod weights;

    pub mod optimizers {
        pub use crate::optim::optimizers::lbfgs::*;
        pub mod lbfgs;
    }
}

/// Reading tabular time-course data
pub mod tabular {
    pub use crate::tabular::reader::*;

    pub mod reader;
}

pub use dataset::Dataset;
