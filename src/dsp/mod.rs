//! DSP side of the noise core: turning generators into audio buffers.
//!
//! Rendering is offline and allocates once per buffer; the generators
//! themselves never allocate.

pub mod renderer;
