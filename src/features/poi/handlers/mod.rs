pub mod poi_handler;

pub use poi_handler::{
    __path_create_poi, __path_delete_poi, __path_get_poi, __path_list_pois, __path_update_poi,
    create_poi, delete_poi, get_poi, list_pois, update_poi,
};
