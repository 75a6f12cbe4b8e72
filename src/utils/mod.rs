pub mod room_id;
