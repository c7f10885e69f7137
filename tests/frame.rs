mod tests {
    use ambient_strip::color::{BLACK, CYAN, GREEN, RED, Rgb, WHITE};
    use ambient_strip::{Brightness, FrameBuffer, FrameError};

    fn assert_up_light<const N: usize>(color: Rgb) {
        let mut frame = FrameBuffer::<N>::new();
        frame.fill(WHITE);
        frame.up_light(color);
        for (i, pixel) in frame.pixels().iter().enumerate() {
            let expected = if i % 2 == 0 { color } else { BLACK };
            assert_eq!(*pixel, expected, "pixel {} of {}", i, N);
        }
    }

    #[test]
    fn test_new_frame_is_black() {
        let frame = FrameBuffer::<5>::new();
        assert_eq!(frame.len(), 5);
        assert_eq!(frame.pixels(), &[BLACK; 5]);
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = FrameBuffer::<4>::new();
        assert_eq!(frame.set(2, RED), Ok(()));
        assert_eq!(frame.get(2), Some(RED));
        assert_eq!(frame.get(1), Some(BLACK));
        assert_eq!(frame.get(4), None);
    }

    #[test]
    fn test_set_out_of_range_leaves_buffer() {
        let mut frame = FrameBuffer::<3>::new();
        frame.fill(GREEN);
        assert_eq!(
            frame.set(3, RED),
            Err(FrameError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(frame.pixels(), &[GREEN; 3]);
    }

    #[test]
    fn test_fill() {
        let mut frame = FrameBuffer::<7>::new();
        frame.fill(CYAN);
        assert!(frame.pixels().iter().all(|pixel| *pixel == CYAN));
    }

    #[test]
    fn test_up_light_even_and_odd_lengths() {
        assert_up_light::<1>(RED);
        assert_up_light::<2>(RED);
        assert_up_light::<17>(CYAN);
        assert_up_light::<18>(GREEN);
    }

    #[test]
    fn test_up_light_odd_length_ends_lit() {
        let mut frame = FrameBuffer::<5>::new();
        frame.up_light(RED);
        assert_eq!(frame.get(4), Some(RED));
    }

    #[test]
    fn test_interleave() {
        let mut frame = FrameBuffer::<4>::new();
        frame.interleave(GREEN, WHITE);
        assert_eq!(frame.pixels(), &[GREEN, WHITE, GREEN, WHITE]);
    }

    #[test]
    fn test_scaled_copy() {
        let mut frame = FrameBuffer::<2>::new();
        frame.interleave(
            Rgb {
                r: 200,
                g: 101,
                b: 3
            },
            WHITE,
        );

        let scaled = frame.scaled(Brightness::new(0.5));
        assert_eq!(
            scaled[0],
            Rgb {
                r: 100,
                g: 50,
                b: 1
            }
        );
        assert_eq!(
            scaled[1],
            Rgb {
                r: 127,
                g: 127,
                b: 127
            }
        );

        // Source buffer is untouched
        assert_eq!(frame.get(1), Some(WHITE));
        assert_eq!(frame.scaled(Brightness::FULL), *frame.pixels());
        assert_eq!(frame.scaled(Brightness::OFF), [BLACK; 2]);
    }
}
