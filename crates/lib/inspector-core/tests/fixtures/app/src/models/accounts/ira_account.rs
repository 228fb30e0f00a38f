pub struct IraAccount;
