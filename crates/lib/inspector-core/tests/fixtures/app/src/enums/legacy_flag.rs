pub enum LegacyFlag { On = 1, Off }
