mod pipeline;

pub use pipeline::build_pipeline_config;
