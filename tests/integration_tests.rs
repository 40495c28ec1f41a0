use image::{ImageBuffer, Rgb, Rgba};
use rand::{Rng, RngCore};
use spiral_lsb::{
    Grid, StegoError,
    bits::{bits_to_image, bits_to_text, image_to_bits, text_to_bits},
    cli::{HideArgs, RecoverArgs, Traversal},
    handler::{handle_hide, handle_recover},
    picture::{load_bw, load_pixels},
    steganography::{
        embed_bit_array, embed_spiral_bit_array, reveal_bit_array, reveal_spiral_bit_array,
    },
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 一个辅助函数，用于创建一张棋盘格样式的黑白消息图像
fn create_message_image(path: &Path, width: u32, height: u32) {
    let img_buf = ImageBuffer::from_fn(width, height, |x, y| {
        if (x / 2 + y) % 2 == 0 {
            Rgb([255u8, 255, 255])
        } else {
            Rgb([0u8, 0, 0])
        }
    });
    img_buf.save(path).expect("Failed to create message image.");
}

fn random_cover(rows: usize, cols: usize) -> Grid<u32> {
    let mut rng = rand::rng();
    Grid::from_fn(rows, cols, |_, _| rng.random_range(0..1u32 << 24))
}

fn random_bits(len: usize) -> Vec<bool> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_bool(0.5)).collect()
}

/// 验证文本从隐藏到恢复的完整流程 (线性顺序)
#[test]
fn test_handle_hide_and_recover_text_linear() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";
    fs::write(&source_text_path, original_text)?;

    // 2. 测试 handle_hide
    handle_hide(HideArgs {
        image: original_image_path.clone(),
        text: Some(source_text_path.clone()),
        message: None,
        dest: Some(hidden_image_path.clone()),
        mode: Traversal::Linear,
        threshold: 128,
        force: false,
    })?;
    assert!(hidden_image_path.exists(), "Hidden image should be created.");

    // 3. 测试 handle_recover
    handle_recover(RecoverArgs {
        image: hidden_image_path.clone(),
        text: Some(recovered_text_path.clone()),
        message: None,
        mode: Traversal::Linear,
        chars: Some(original_text.chars().count()),
        force: false,
    })?;

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证文本在螺旋顺序下的隐藏与恢复，以及默认输出路径的生成
#[test]
fn test_handle_hide_and_recover_text_spiral_with_default_dest() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_text_path = dir.path().join("source.txt");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 64, 48);
    let original_text = "Spiral inward, 螺旋向内。";
    fs::write(&source_text_path, original_text)?;

    handle_hide(HideArgs {
        image: original_image_path.clone(),
        text: Some(source_text_path),
        message: None,
        dest: None, // 关键：测试默认路径
        mode: Traversal::Spiral,
        threshold: 128,
        force: false,
    })?;

    let expected_hidden_path = dir.path().join("doctored_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    handle_recover(RecoverArgs {
        image: expected_hidden_path.clone(),
        text: Some(recovered_text_path.clone()),
        message: None,
        mode: Traversal::Spiral,
        chars: Some(original_text.chars().count()),
        force: false,
    })?;
    assert_eq!(fs::read_to_string(&recovered_text_path)?, original_text);

    // 以线性顺序读取会得到不同的内容
    let hidden = load_pixels(&expected_hidden_path)?;
    let linear = bits_to_text(&reveal_bit_array(&hidden));
    assert!(!linear.starts_with(original_text));

    Ok(())
}

/// 验证黑白图像在螺旋顺序下带尺寸头部的隐藏与恢复
#[test]
fn test_handle_hide_and_recover_image_spiral() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let cover_path = dir.path().join("cover.png");
    let message_path = dir.path().join("message.png");
    let hidden_path = dir.path().join("hidden.png");
    let revealed_path = dir.path().join("revealed.png");

    create_test_image(&cover_path, 30, 20);
    create_message_image(&message_path, 12, 9);

    handle_hide(HideArgs {
        image: cover_path,
        text: None,
        message: Some(message_path.clone()),
        dest: Some(hidden_path.clone()),
        mode: Traversal::Spiral,
        threshold: 128,
        force: false,
    })?;

    handle_recover(RecoverArgs {
        image: hidden_path,
        text: None,
        message: Some(revealed_path.clone()),
        mode: Traversal::Spiral,
        chars: None,
        force: false,
    })?;

    let expected = load_bw(&message_path, 128)?;
    let revealed = load_bw(&revealed_path, 128)?;
    assert_eq!((revealed.rows(), revealed.cols()), (9, 12));
    assert_eq!(revealed, expected);

    Ok(())
}

/// 验证黑白图像线性嵌入时恢复出与载体同尺寸的 LSB 平面
#[test]
fn test_handle_hide_and_recover_image_linear() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let cover_path = dir.path().join("cover.png");
    let message_path = dir.path().join("message.png");
    let hidden_path = dir.path().join("hidden.png");
    let revealed_path = dir.path().join("revealed.png");

    create_test_image(&cover_path, 16, 16);
    create_message_image(&message_path, 10, 7);

    handle_hide(HideArgs {
        image: cover_path,
        text: None,
        message: Some(message_path.clone()),
        dest: Some(hidden_path.clone()),
        mode: Traversal::Linear,
        threshold: 128,
        force: false,
    })?;
    handle_recover(RecoverArgs {
        image: hidden_path,
        text: None,
        message: Some(revealed_path.clone()),
        mode: Traversal::Linear,
        chars: None,
        force: false,
    })?;

    let expected = load_bw(&message_path, 128)?;
    let revealed = load_bw(&revealed_path, 128)?;
    assert_eq!((revealed.rows(), revealed.cols()), (16, 16));
    for row in 0..expected.rows() {
        assert_eq!(&revealed.row(row)[..expected.cols()], expected.row(row));
    }

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let text_path = dir.path().join("text.txt");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&text_path, "some text")?;

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let hide_args = |force| HideArgs {
        image: image_path.clone(),
        text: Some(text_path.clone()),
        message: None,
        dest: Some(dest_path.clone()),
        mode: Traversal::Linear,
        threshold: 128,
        force,
    };

    let result = handle_hide(hide_args(false));
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let result = handle_hide(hide_args(true));
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let text_path = dir.path().join("large.txt");
    let dest_path = dir.path().join("dest.png");

    // 10x10 的图像只有 100 个像素，不足以容纳 5000 个字符
    create_test_image(&image_path, 10, 10);
    fs::write(&text_path, "a".repeat(5000))?;

    let result = handle_hide(HideArgs {
        image: image_path,
        text: Some(text_path),
        message: None,
        dest: Some(dest_path.clone()),
        mode: Traversal::Spiral,
        threshold: 128,
        force: false,
    });

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists(), "Nothing should be written on failure.");

    Ok(())
}

/// 随机载体与随机消息的线性、螺旋往返
#[test]
fn test_random_bit_array_round_trips() {
    let mut rng = rand::rng();
    for _ in 0..50 {
        let rows = rng.random_range(1..20);
        let cols = rng.random_range(1..20);
        let cover = random_cover(rows, cols);
        let message = random_bits(rng.random_range(0..=rows * cols));

        let linear = embed_bit_array(&cover, &message).unwrap();
        assert_eq!(&reveal_bit_array(&linear)[..message.len()], message.as_slice());

        let spiral = embed_spiral_bit_array(&cover, &message).unwrap();
        let revealed = reveal_spiral_bit_array(&spiral);
        assert_eq!(revealed.len(), rows * cols);
        assert_eq!(&revealed[..message.len()], message.as_slice());
    }
}

/// 随机黑白图像的头部编码往返，以及截断时的错误
#[test]
fn test_random_image_framing() {
    let mut rng = rand::rng();
    for _ in 0..30 {
        let rows = rng.random_range(0..15);
        let cols = rng.random_range(0..15);
        let image = Grid::from_vec(rows, cols, random_bits(rows * cols)).unwrap();

        let bits = image_to_bits(&image).unwrap();
        assert_eq!(bits.len(), 64 + rows * cols);
        assert_eq!(bits_to_image(&bits).unwrap(), image);

        if rows * cols > 0 {
            assert!(matches!(
                bits_to_image(&bits[..bits.len() - 1]),
                Err(StegoError::TruncatedPayload { .. })
            ));
        }
    }
}

/// 随机文本的编码往返
#[test]
fn test_random_text_round_trips() {
    let mut rng = rand::rng();
    for _ in 0..30 {
        let len = rng.random_range(0..200);
        let text: String = (0..len)
            .map(|_| char::from(rng.random_range(b'A'..=b'z')))
            .collect();
        let bits = text_to_bits(&text);
        assert_eq!(bits.len(), 16 * len);
        assert_eq!(bits_to_text(&bits), text);
    }
}
