pub struct HasUuid;
