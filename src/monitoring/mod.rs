/*!
 * Monitoring
 * Structured tracing setup for the scheduler and its host
 */

mod tracer;

pub use tracer::init_tracing;
