pub enum Status { Draft, Published, Archived }
