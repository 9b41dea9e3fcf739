pub mod backward_pass;
pub mod float_calc;
pub mod forward_pass;

pub use backward_pass::BackwardPass;
pub use float_calc::FloatCalculator;
pub use forward_pass::ForwardPass;
