pub mod world_index;
