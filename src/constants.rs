/// 图像消息头部中每个维度字段 (高度、宽度) 占用的位数。
pub const HEADER_FIELD_BITS: usize = 32;

/// 图像消息头部的总位数：高度 32 位 + 宽度 32 位。
pub const HEADER_BITS: usize = HEADER_FIELD_BITS * 2;

/// 文本中单个字符 (UTF-16 码元) 占用的位数。
pub const CHAR_BITS: usize = 16;

/// 将灰度值转换为黑白时的默认阈值，灰度值大于或等于该值视为白色。
pub const DEFAULT_THRESHOLD: i32 = 128;

/// 清除 alpha 通道时使用的掩码，仅保留 24 位 RGB。
pub const RGB_MASK: u32 = 0x00FF_FFFF;

/// 单个颜色通道的最大值。
pub const CHANNEL_MAX: i32 = 255;
