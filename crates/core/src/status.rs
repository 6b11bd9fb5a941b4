//! Schedule and record status codes as the backend sends them.

use serde::{Deserialize, Serialize};

/// Length of one calendar slot.
pub const SCHEDULE_STEP_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ScheduleStatus {
    Pending,
    Confirmed,
    Done,
    Cancelled,
}

impl ScheduleStatus {
    pub const fn code(self) -> u8 {
        match self {
            ScheduleStatus::Pending => 1,
            ScheduleStatus::Confirmed => 2,
            ScheduleStatus::Done => 3,
            ScheduleStatus::Cancelled => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScheduleStatus::Pending => "Đang chờ",
            ScheduleStatus::Confirmed => "Xác nhận",
            ScheduleStatus::Done => "Đã tới",
            ScheduleStatus::Cancelled => "Đã huỷ",
        }
    }
}

impl TryFrom<u8> for ScheduleStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ScheduleStatus::Pending),
            2 => Ok(ScheduleStatus::Confirmed),
            3 => Ok(ScheduleStatus::Done),
            4 => Ok(ScheduleStatus::Cancelled),
            other => Err(format!("unknown schedule status {other}")),
        }
    }
}

impl From<ScheduleStatus> for u8 {
    fn from(status: ScheduleStatus) -> Self {
        status.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RecordStatus {
    Processing,
    WaitingPayment,
    Ended,
}

impl RecordStatus {
    pub const fn code(self) -> u8 {
        match self {
            RecordStatus::Processing => 1,
            RecordStatus::WaitingPayment => 2,
            RecordStatus::Ended => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RecordStatus::Processing => "Đang tiến hành",
            RecordStatus::WaitingPayment => "Chờ thanh toán",
            RecordStatus::Ended => "Đã kết thúc",
        }
    }
}

impl TryFrom<u8> for RecordStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(RecordStatus::Processing),
            2 => Ok(RecordStatus::WaitingPayment),
            3 => Ok(RecordStatus::Ended),
            other => Err(format!("unknown record status {other}")),
        }
    }
}

impl From<RecordStatus> for u8 {
    fn from(status: RecordStatus) -> Self {
        status.code()
    }
}
