pub struct AuditLog;
