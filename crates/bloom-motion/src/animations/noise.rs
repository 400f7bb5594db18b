//! 3-D simplex noise (Ashima Arts / Ian McEwan formulation).

type Vec3 = [f32; 3];
type Vec4 = [f32; 4];

fn mod289(x: f32) -> f32 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: f32) -> f32 {
    mod289((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: f32) -> f32 {
    1.792_842_9 - 0.853_734_7 * r
}

fn dot3(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn step(edge: f32, x: f32) -> f32 {
    if x >= edge { 1.0 } else { 0.0 }
}

/// Simplex noise in roughly `[-1, 1]`.
pub fn snoise(v: Vec3) -> f32 {
    const CX: f32 = 1.0 / 6.0;
    const CY: f32 = 1.0 / 3.0;

    // Skew to find the simplex cell and the first corner.
    let skew = (v[0] + v[1] + v[2]) * CY;
    let mut i: Vec3 = [
        (v[0] + skew).floor(),
        (v[1] + skew).floor(),
        (v[2] + skew).floor(),
    ];
    let unskew = (i[0] + i[1] + i[2]) * CX;
    let x0: Vec3 = [
        v[0] - i[0] + unskew,
        v[1] - i[1] + unskew,
        v[2] - i[2] + unskew,
    ];

    // Rank the offsets to pick the other two corners.
    let g: Vec3 = [step(x0[1], x0[0]), step(x0[2], x0[1]), step(x0[0], x0[2])];
    let l: Vec3 = [1.0 - g[0], 1.0 - g[1], 1.0 - g[2]];
    let i1: Vec3 = [g[0].min(l[2]), g[1].min(l[0]), g[2].min(l[1])];
    let i2: Vec3 = [g[0].max(l[2]), g[1].max(l[0]), g[2].max(l[1])];

    let x1: Vec3 = std::array::from_fn(|k| x0[k] - i1[k] + CX);
    let x2: Vec3 = std::array::from_fn(|k| x0[k] - i2[k] + CY);
    let x3: Vec3 = std::array::from_fn(|k| x0[k] - 0.5);

    // Hash the four corners.
    for c in &mut i {
        *c = mod289(*c);
    }
    let corner = |axis: usize| -> Vec4 { [0.0, i1[axis], i2[axis], 1.0] };
    let cz = corner(2);
    let cy = corner(1);
    let cx = corner(0);
    let p: Vec4 = std::array::from_fn(|k| {
        permute(permute(permute(i[2] + cz[k]) + i[1] + cy[k]) + i[0] + cx[k])
    });

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let n = 1.0 / 7.0;
    let ns: Vec3 = [2.0 * n, 0.5 * n - 1.0, n];

    let j: Vec4 = std::array::from_fn(|k| p[k] - 49.0 * (p[k] * ns[2] * ns[2]).floor());
    let x_: Vec4 = std::array::from_fn(|k| (j[k] * ns[2]).floor());
    let y_: Vec4 = std::array::from_fn(|k| (j[k] - 7.0 * x_[k]).floor());
    let gx: Vec4 = std::array::from_fn(|k| x_[k] * ns[0] + ns[1]);
    let gy: Vec4 = std::array::from_fn(|k| y_[k] * ns[0] + ns[1]);
    let h: Vec4 = std::array::from_fn(|k| 1.0 - gx[k].abs() - gy[k].abs());

    let sh: Vec4 = std::array::from_fn(|k| -step(h[k], 0.0));
    let fold = |b: f32, s: f32| b + ((b.floor() * 2.0) + 1.0) * s;

    let mut grads: [Vec3; 4] =
        std::array::from_fn(|k| [fold(gx[k], sh[k]), fold(gy[k], sh[k]), h[k]]);
    for grad in &mut grads {
        let norm = taylor_inv_sqrt(dot3(*grad, *grad));
        for c in grad.iter_mut() {
            *c *= norm;
        }
    }

    // Mix the corner contributions.
    let offsets = [x0, x1, x2, x3];
    let sum: f32 = grads
        .iter()
        .zip(offsets)
        .map(|(grad, offset)| {
            let m = (0.6 - dot3(offset, offset)).max(0.0);
            m * m * m * m * dot3(*grad, offset)
        })
        .sum();
    42.0 * sum
}
