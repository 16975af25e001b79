pub mod fighter_stats;
pub mod method;
