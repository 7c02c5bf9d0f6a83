use foundation::BucketCoord;

/// Buckets the scenery project covers, published or not.
pub const AMERICAS_GRID: [BucketCoord; 36] = [
    BucketCoord::new(60, -140),
    BucketCoord::new(50, -140),
    BucketCoord::new(60, -130),
    BucketCoord::new(50, -130),
    BucketCoord::new(40, -130),
    BucketCoord::new(30, -130),
    BucketCoord::new(60, -120),
    BucketCoord::new(50, -120),
    BucketCoord::new(40, -120),
    BucketCoord::new(30, -120),
    BucketCoord::new(20, -120),
    BucketCoord::new(60, -110),
    BucketCoord::new(50, -110),
    BucketCoord::new(40, -110),
    BucketCoord::new(30, -110),
    BucketCoord::new(20, -110),
    BucketCoord::new(60, -100),
    BucketCoord::new(50, -100),
    BucketCoord::new(40, -100),
    BucketCoord::new(30, -100),
    BucketCoord::new(20, -100),
    BucketCoord::new(60, -90),
    BucketCoord::new(50, -90),
    BucketCoord::new(40, -90),
    BucketCoord::new(30, -90),
    BucketCoord::new(20, -90),
    BucketCoord::new(60, -80),
    BucketCoord::new(50, -80),
    BucketCoord::new(40, -80),
    BucketCoord::new(30, -80),
    BucketCoord::new(20, -80),
    BucketCoord::new(60, -70),
    BucketCoord::new(50, -70),
    BucketCoord::new(40, -70),
    BucketCoord::new(50, -60),
    BucketCoord::new(40, -60),
];
