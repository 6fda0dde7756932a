use chrono::{DateTime, Utc};

/// # Summary
/// 时间供给器接口，用于隔离物理系统时钟。
/// 筛选引擎通过此接口确定回溯窗口的终点。
pub trait TimeProvider: Send + Sync {
    /// 获取当前时间
    fn now(&self) -> DateTime<Utc>;
}

/// # Summary
/// 正常运行使用的真实时钟，直接返回操作系统当前时间。
pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// # Summary
/// 测试专用的固定时钟，始终返回创建时给定的"当前"时间。
pub struct FakeClockProvider {
    current_time: DateTime<Utc>,
}

impl FakeClockProvider {
    /// 使用指定的初始时间创建虚拟时钟
    pub fn new(initial_time: DateTime<Utc>) -> Self {
        Self {
            current_time: initial_time,
        }
    }
}

impl TimeProvider for FakeClockProvider {
    fn now(&self) -> DateTime<Utc> {
        self.current_time
    }
}
