pub mod training_metrics;
