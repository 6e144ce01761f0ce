//! Клиентская пагинация (страницы нумеруются с 1)

use std::num::NonZeroUsize;

/// Одна страница последовательности
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
}

/// Количество страниц; ноль для пустой последовательности
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Срез `[(page-1)*size, page*size)`, обрезанный по границам.
/// Страница 0 или за пределами `total_pages` даёт пустой срез.
pub fn paginate<T>(sequence: &[T], page: usize, page_size: NonZeroUsize) -> Page<'_, T> {
    let total = total_pages(sequence.len(), page_size);
    let items = match page.checked_sub(1) {
        Some(index) if index < total => {
            let start = index * page_size.get();
            let end = (start + page_size.get()).min(sequence.len());
            &sequence[start..end]
        }
        _ => &sequence[0..0],
    };
    Page {
        items,
        total_pages: total,
    }
}

/// Вернуть номер страницы в диапазон `[1, max(total_pages, 1)]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_last_partial_page() {
        let data: Vec<u32> = (1..=25).collect();
        let page = paginate(&data, 3, size(10));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_empty_sequence_has_zero_pages() {
        let data: Vec<u32> = Vec::new();
        let page = paginate(&data, 1, size(10));
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages(1, size(10)), 1);
        assert_eq!(total_pages(10, size(10)), 1);
        assert_eq!(total_pages(11, size(10)), 2);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let data: Vec<u32> = (1..=5).collect();
        assert!(paginate(&data, 0, size(2)).items.is_empty());
        assert!(paginate(&data, 4, size(2)).items.is_empty());
    }

    #[test]
    fn test_page_size_covering_everything() {
        let data: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&data, 1, size(7)).items, data.as_slice());
        assert_eq!(paginate(&data, 1, size(100)).items, data.as_slice());
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(4, 0), 1);
        assert_eq!(clamp_page(2, 3), 2);
    }
}
