use image::{GrayImage, ImageBuffer, Luma};

/// Response surface, one value in [-1, 1] per template placement.
pub type Surface = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Summed-area tables of pixel values and squared pixel values.
struct Integral {
    stride: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl Integral {
    fn new(image: &GrayImage) -> Self {
        let (w, h) = image.dimensions();
        let stride = w as usize + 1;
        let mut sum = vec![0u64; stride * (h as usize + 1)];
        let mut sum_sq = vec![0u64; stride * (h as usize + 1)];
        for (y, row) in image.rows().enumerate() {
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (x, px) in row.enumerate() {
                let v = px[0] as u64;
                row_sum += v;
                row_sum_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sum_sq;
            }
        }
        Self { stride, sum, sum_sq }
    }

    /// `(sum, sum of squares)` over the `w` x `h` window at `(x, y)`.
    fn window(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        let at = |table: &[u64]| {
            let (top, bottom) = (y * self.stride, (y + h) * self.stride);
            table[bottom + x + w] + table[top + x] - table[top + x + w] - table[bottom + x]
        };
        (at(&self.sum), at(&self.sum_sq))
    }
}

/// Zero-mean normalized cross correlation of `template` over `image`.
///
/// The surface is `(W - w + 1) x (H - h + 1)`; it is empty when the template
/// does not fit. Placements where either the template or the window is flat
/// score 0.
pub fn match_template(image: &GrayImage, template: &GrayImage) -> Surface {
    let (iw, ih) = image.dimensions();
    let (tw, th) = template.dimensions();
    if tw == 0 || th == 0 || tw > iw || th > ih {
        return Surface::new(0, 0);
    }
    let mut out = Surface::new(iw - tw + 1, ih - th + 1);

    let n = (tw * th) as f64;
    let t_mean = template.pixels().map(|p| p[0] as f64).sum::<f64>() / n;
    let t_zero: Vec<f64> = template.pixels().map(|p| p[0] as f64 - t_mean).collect();
    let t_norm = t_zero.iter().map(|v| v * v).sum::<f64>().sqrt();
    if t_norm == 0.0 {
        return out;
    }

    let integral = Integral::new(image);
    let raw = image.as_raw();
    let (stride, tw, th) = (iw as usize, tw as usize, th as usize);
    let n_px = (tw * th) as u128;

    for (x, y, px) in out.enumerate_pixels_mut() {
        let (x, y) = (x as usize, y as usize);
        let (sum, sum_sq) = integral.window(x, y, tw, th);
        // n * sum of squared deviations, exact in integers
        let spread = n_px * sum_sq as u128 - (sum as u128) * (sum as u128);
        if spread == 0 {
            continue;
        }
        let w_norm = (spread as f64 / n).sqrt();

        let mut num = 0.0;
        for ty in 0..th {
            let start = (y + ty) * stride + x;
            let window_row = &raw[start..start + tw];
            let template_row = &t_zero[ty * tw..(ty + 1) * tw];
            num += window_row.iter().zip(template_row).map(|(&p, &t)| p as f64 * t).sum::<f64>();
        }
        px[0] = (num / (t_norm * w_norm)).clamp(-1.0, 1.0) as f32;
    }
    out
}
