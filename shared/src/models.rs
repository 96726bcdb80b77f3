pub mod group_resource;

pub use group_resource::GroupResource;
