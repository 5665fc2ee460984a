pub mod offset_line;
pub mod path_geom;
