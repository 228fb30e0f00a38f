pub enum Priority { Low = 1, High = 3 }
